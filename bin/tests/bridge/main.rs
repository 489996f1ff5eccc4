//! Guest module tests of the random buffer bridge.

use quadrand::{
    config::BridgeConfig,
    errors::{Error, Errors},
    plugin::{init, Imports, Plugins},
    random::{OsSource, SecureSource, UnavailableSource},
    wasm::{context::Context, engine::Engine, module::Module},
};

/// Guest doing what the engine does with a random buffer: request a handle, read its
/// length, copy it to memory offset 0 and free the handle.
const GUEST: &str = r#"
    (module
        (import "env" "macroquad_js_get_random_buffer" (func $get (param i32) (result i32)))
        (import "env" "js_buf_length" (func $len (param i32) (result i32)))
        (import "env" "js_unsafe_get_buf" (func $buf (param i32 i32)))
        (import "env" "js_free_object" (func $free (param i32)))
        (memory (export "memory") 1)

        (func (export "fill") (param $n i32) (result i32)
            (local $h i32)
            (local $len i32)
            (local.set $h (call $get (local.get $n)))
            (local.set $len (call $len (local.get $h)))
            (call $buf (local.get $h) (i32.const 0))
            (call $free (local.get $h))
            (local.get $len)
        )

        (func (export "keep") (param $n i32) (result i32)
            (call $get (local.get $n))
        )

        (func (export "free") (param $h i32)
            (call $free (local.get $h))
        )

        (func (export "copy_to") (param $h i32) (param $ptr i32)
            (call $buf (local.get $h) (local.get $ptr))
        )
    )"#;

/// Link the bridge and instantiate `wat` with the given source.
fn instantiate(wat: &str, source: Box<dyn SecureSource>) -> anyhow::Result<Module> {
    let engine = Engine::new()?;
    let config = BridgeConfig::default();
    let mut plugins = Plugins::new();
    init(&mut plugins, &config)?;
    let imports: Imports = plugins.link(&engine)?;

    let ctx = Context::new("guest".to_string(), source, &config);
    Module::new(&engine, ctx, wat.as_bytes(), &imports)
}

/// Root `Error` of a failed guest call.
fn root_error(err: &anyhow::Error) -> Option<&Error> {
    err.chain().find_map(|e| e.downcast_ref::<Error>())
}

#[test]
fn guest_reads_random_bytes() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");

    assert_eq!(module.call_func::<i32, i32>("fill", 32).expect("fill"), 32);
    let first = module.read_memory(0, 32).expect("memory");
    assert!(first.iter().any(|b| *b != 0));

    assert_eq!(module.call_func::<i32, i32>("fill", 32).expect("fill"), 32);
    let second = module.read_memory(0, 32).expect("memory");
    assert_ne!(first, second);

    assert!(module.context().objects().is_empty());
}

#[test]
fn zero_length_buffer() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");
    assert_eq!(module.call_func::<i32, i32>("fill", 0).expect("fill"), 0);
}

#[test]
fn one_million_bytes() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");
    let handle = module.call_func::<i32, i32>("keep", 1_000_000).expect("keep");
    let handle = u32::try_from(handle).expect("handle");
    assert_eq!(
        module.context().objects().get(handle).expect("object").len(),
        1_000_000
    );
}

#[test]
fn negative_length_traps() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");
    let err = module.call_func::<i32, i32>("fill", -1).expect_err("negative");
    assert_eq!(root_error(&err), Some(&Error::InvalidLength(-1)));
}

#[test]
fn unavailable_source_traps_without_buffer() {
    let mut module = instantiate(GUEST, Box::new(UnavailableSource)).expect("instantiate");
    let err = module.call_func::<i32, i32>("keep", 16).expect_err("unavailable");
    assert!(matches!(
        root_error(&err),
        Some(Error::RandomnessUnavailable(_))
    ));
    assert!(module.context().objects().is_empty());
}

#[test]
fn freed_handle_is_unknown() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");
    let handle = module.call_func::<i32, i32>("keep", 8).expect("keep");
    module.call_func::<i32, ()>("free", handle).expect("free");

    let err = module
        .call_func::<i32, ()>("free", handle)
        .expect_err("double free");
    let handle = u32::try_from(handle).expect("handle");
    assert_eq!(root_error(&err), Some(&Error::UnknownHandle(handle)));
}

#[test]
fn copy_past_memory_end_traps() {
    let mut module = instantiate(GUEST, Box::new(OsSource)).expect("instantiate");
    let handle = module.call_func::<i32, i32>("keep", 16).expect("keep");

    // One 64 KiB page, the last 8 bytes cannot hold 16.
    let err = module
        .call_func::<(i32, i32), ()>("copy_to", (handle, 65_528))
        .expect_err("out of bounds");
    assert_eq!(
        root_error(&err),
        Some(&Error::MemoryAccess {
            offset: 65_528,
            len: 16
        })
    );
}

#[test]
fn unresolved_imports_are_reported_together() {
    let wat = r#"
        (module
            (import "env" "macroquad_js_get_random_buffer" (func (param i32) (result i32)))
            (import "env" "macroquad_js_get_time" (func (result f64)))
            (import "env" "sapp_set_cursor" (func (param i32)))
        )"#;
    let err = instantiate(wat, Box::new(OsSource))
        .err()
        .expect("instantiation must fail");
    let errors = err.downcast_ref::<Errors>().expect("errors");
    assert_eq!(errors.iter().count(), 2);
    assert!(errors.to_string().contains("env.macroquad_js_get_time"));
    assert!(errors.to_string().contains("env.sapp_set_cursor"));
}

#[test]
fn length_of_freed_handle_traps() {
    let wat = r#"
        (module
            (import "env" "macroquad_js_get_random_buffer" (func $get (param i32) (result i32)))
            (import "env" "js_buf_length" (func $len (param i32) (result i32)))
            (import "env" "js_free_object" (func $free (param i32)))
            (memory (export "memory") 1)
            (func (export "len_after_free") (result i32)
                (local $h i32)
                (local.set $h (call $get (i32.const 8)))
                (call $free (local.get $h))
                (call $len (local.get $h))
            )
        )"#;
    let mut module = instantiate(wat, Box::new(OsSource)).expect("instantiate");
    let err = module
        .call_func::<(), i32>("len_after_free", ())
        .expect_err("freed handle");
    assert_eq!(root_error(&err), Some(&Error::UnknownHandle(1)));
}

#[test]
fn copy_without_memory_export_traps() {
    let wat = r#"
        (module
            (import "env" "macroquad_js_get_random_buffer" (func $get (param i32) (result i32)))
            (import "env" "js_unsafe_get_buf" (func $buf (param i32 i32)))
            (memory 1)
            (func (export "copy") (param $n i32)
                (call $buf (call $get (local.get $n)) (i32.const 0))
            )
        )"#;
    let mut module = instantiate(wat, Box::new(OsSource)).expect("instantiate");
    let err = module.call_func::<i32, ()>("copy", 16).expect_err("no memory");
    assert_eq!(root_error(&err), Some(&Error::MissingMemory));
}

#[test]
fn reference_types_guest_uses_bridge() {
    let wat = r#"
        (module
            (import "env" "macroquad_js_get_random_buffer" (func $get (param i32) (result i32)))
            (import "env" "js_buf_length" (func $len (param i32) (result i32)))
            (type $t (func (param i32) (result i32)))
            (table $unused 1 funcref)
            (table $callbacks 1 funcref)
            (func $random_len (type $t)
                (call $len (call $get (local.get 0)))
            )
            (elem declare func $random_len)
            (memory (export "memory") 1)
            (func (export "indirect") (param $n i32) (result i32)
                (table.set $callbacks (i32.const 0) (ref.func $random_len))
                (call_indirect $callbacks (type $t) (local.get $n) (i32.const 0))
            )
        )"#;
    let mut module = instantiate(wat, Box::new(OsSource)).expect("instantiate");
    assert_eq!(module.call_func::<i32, i32>("indirect", 12).expect("call"), 12);
}
