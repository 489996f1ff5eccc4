//! Build script, generates the build info used by the `--version` output.

fn main() -> std::io::Result<()> {
    built::write_built_file()
}
