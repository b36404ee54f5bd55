fn main() {
    if let Err(e) = pgmodel_cli::run(std::env::args_os()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
