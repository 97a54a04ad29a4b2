// === Entry point for desktop ===
pub fn main() {
    super::run::native_main();
}
