use apst_compare::export::diagnostic_line;
use apst_compare::init_logging;
use apst_compare::tabulate::{parse_cli, run};

fn main() {
    let (config, verbose) = parse_cli();
    init_logging(verbose);
    match run(&config) {
        Ok(path) => println!("Comparison file generated successfully at: {}", path.display()),
        Err(e) => {
            eprintln!("{}", diagnostic_line(&e));
            std::process::exit(1);
        }
    }
}
