fn main() {
    // Only the native backend talks to libfbink; preview builds link nothing.
    println!("cargo:rerun-if-env-changed=FBINK_LIB_DIR");
    println!("cargo:rerun-if-env-changed=FBINK_STATIC");

    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("FBINK_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }

    let kind = if std::env::var_os("FBINK_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={}=fbink", kind);
}
