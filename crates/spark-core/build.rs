// File: crates/spark-core/build.rs
// Summary: Links the Windows system libraries Skia's raster backend and ICU pull in.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used by Skia's font manager.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
