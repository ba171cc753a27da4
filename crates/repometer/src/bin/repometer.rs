fn main() {
    if let Err(err) = repometer::run() {
        eprintln!("{}", repometer::format_error(&err));
        std::process::exit(1);
    }
}
