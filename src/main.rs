fn main() {
    if let Err(err) = gemchat::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
