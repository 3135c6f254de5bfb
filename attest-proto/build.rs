use std::io::Result;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=proto/");

    let mut config = prost_build::Config::new();
    config.compile_protos(&["proto/snapshot.proto"], &["proto/"])?;

    Ok(())
}
