fn main() {
    if let Err(err) = sheet_audit::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
