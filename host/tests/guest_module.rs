use {
    hello_host::{GuestSource, GuestValue, Loader, LoaderConfig},
    std::path::PathBuf,
};

fn guest_wasm() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../target/wasm32-unknown-unknown/release/hello_guest.wasm")
}

#[tokio::test]
#[ignore = "requires the guest built for wasm32-unknown-unknown"]
async fn compiled_guest_round_trip() {
    let mut bridge = Loader::new(LoaderConfig::new(GuestSource::File(guest_wasm())))
        .initialize()
        .await
        .unwrap();

    for _ in 0..2 {
        assert_eq!(bridge.invoke().unwrap(), GuestValue::Text("Hello from Rust!".into()));
    }

    assert_eq!(bridge.add_numbers(-7, 7).unwrap(), GuestValue::Number(0));

    let handle = bridge.new_context().unwrap();
    assert_eq!(
        bridge.context_status(handle).unwrap(),
        GuestValue::Text("message: context initialized, count: 0".into())
    );

    bridge.increment(handle).unwrap();
    assert_eq!(
        bridge.context_status(handle).unwrap(),
        GuestValue::Text("message: context initialized, count: 1".into())
    );

    bridge.free_context(handle).unwrap();
}
