use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=OM_MODEL_DIR");
    println!("cargo:rerun-if-env-changed=OM_MODEL_LIB");

    // Nothing to link unless we're driving a real compiled model
    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    if let Ok(dir) = env::var("OM_MODEL_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    let lib = env::var("OM_MODEL_LIB").unwrap_or_else(|_| String::from("model"));
    println!("cargo:rustc-link-lib=dylib={lib}");
}
