/// Tell Cargo to re-run this build script (and therefore re-embed the dashboard)
/// whenever any file of the static dashboard changes.
fn main() {
    println!("cargo:rerun-if-changed=../dashboard");
}
