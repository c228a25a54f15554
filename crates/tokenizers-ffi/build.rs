fn main() {
    // include/tokenizers_c.h is the C header shipped next to the cdylib; it is
    // regenerated from the `tokenizers_*` exports only with `c-bindings`.
    #[cfg(feature = "c-bindings")]
    {
        let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
        let include_dir = std::path::Path::new(&crate_dir).join("include");
        std::fs::create_dir_all(&include_dir).expect("Failed to create include directory");

        let config = cbindgen::Config::from_file("cbindgen.toml").unwrap_or_default();
        match cbindgen::Builder::new()
            .with_crate(&crate_dir)
            .with_config(config)
            .generate()
        {
            Ok(bindings) => {
                bindings.write_to_file(include_dir.join("tokenizers_c.h"));
            }
            Err(e) => panic!("Unable to generate tokenizers_c.h: {e}"),
        }

        println!("cargo:rerun-if-changed=src/");
        println!("cargo:rerun-if-changed=cbindgen.toml");
    }
}
