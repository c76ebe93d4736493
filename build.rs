fn main() {
    // ESP-IDF link arguments and environment; host builds need nothing.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
