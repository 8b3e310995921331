use {
    hello_host::{GuestSource, GuestValue, Loader, LoaderConfig},
    std::{env, path::PathBuf},
};

// build the guest first:
// cargo build -p hello-guest --target wasm32-unknown-unknown --release
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let wasm_file = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?)
        .join("../target/wasm32-unknown-unknown/release/hello_guest.wasm");
    let mut bridge = Loader::new(LoaderConfig::new(GuestSource::File(wasm_file)))
        .initialize()
        .await?;

    let greeting = bridge.invoke()?;
    println!("Wasm module responds: {greeting}");

    let sum = bridge.add_numbers(123, 456)?;
    println!("123 + 456 = {sum}");
    anyhow::ensure!(sum == GuestValue::Number(579));

    let handle = bridge.new_context()?;
    for _ in 0..3 {
        bridge.increment(handle)?;
    }
    println!("{}", bridge.context_status(handle)?);
    bridge.free_context(handle)?;

    Ok(())
}
