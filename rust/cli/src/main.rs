fn main() {
    sevens_cli::logging::init();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = sevens_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
