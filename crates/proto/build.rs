use std::{env, fs, path::PathBuf};

use miette::IntoDiagnostic;
use prost::Message;

/// Extra derives for every generated message. None of the schema types carry floats, so all of
/// them can be hashed and compared for total equality.
const DERIVES: &str = "#[derive(Eq, Hash)]";

fn main() -> miette::Result<()> {
    println!("cargo::rerun-if-changed=proto");

    // Compute the directory of the `proto` definitions
    let crate_dir: PathBuf = env::var("CARGO_MANIFEST_DIR").into_diagnostic()?.into();
    let proto_dir = crate_dir.join("proto");

    // Compute the compiler's target file path.
    let out = env::var("OUT_DIR").into_diagnostic()?;
    let file_descriptor_path = PathBuf::from(out).join("file_descriptor_set.bin");

    let protos = &[
        proto_dir.join("ocean/v1alpha/types.proto"),
        proto_dir.join("ocean/v1/types.proto"),
        proto_dir.join("ocean/v1/notification.proto"),
    ];
    let includes = &[proto_dir];

    // `protox` avoids depending on a system `protoc` installation.
    let file_descriptors = protox::compile(protos, includes)?;
    fs::write(&file_descriptor_path, file_descriptors.encode_to_vec()).into_diagnostic()?;

    let prost_config = prost_build::Config::new();

    tonic_build::configure()
        .file_descriptor_set_path(&file_descriptor_path)
        .skip_protoc_run()
        .message_attribute(".ocean", DERIVES)
        .compile_protos_with_config(prost_config, protos, includes)
        .into_diagnostic()?;

    Ok(())
}
