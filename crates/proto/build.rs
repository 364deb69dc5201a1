use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let file_descriptors = protox::compile(["proto/scope/v1/scope.proto"], ["proto"])?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    // compile_fds skips protoc, so file_descriptor_set_path is ignored;
    // write the descriptor set ourselves.
    std::fs::write(
        out_dir.join("scope_descriptor.bin"),
        prost::Message::encode_to_vec(&file_descriptors),
    )?;
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("scope_descriptor.bin"))
        .compile_fds(file_descriptors)?;

    println!("cargo:rerun-if-changed=proto/scope/v1/scope.proto");
    Ok(())
}
