fn main() {
    if let Err(e) = ielts_engine::run() {
        eprintln!("ielts-engine fatal: {e:#}");
        std::process::exit(1);
    }
}
