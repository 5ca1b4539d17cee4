//! Generates the `Variant` encoding table from `x64asm-meta`'s instruction
//! descriptors and writes it to `OUT_DIR/table.rs`, where `src/table.rs`
//! pulls it in with `include!`.

use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    x64asm_meta::generate_rust_table(&out_dir.join("table.rs"))
        .expect("failed to generate the encoding table");
    println!("cargo:rerun-if-changed=build.rs");
}
