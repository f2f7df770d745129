use apst_compare::export::diagnostic_line;
use apst_compare::extract::{parse_cli, run};
use apst_compare::init_logging;

fn main() {
    let (config, verbose) = parse_cli();
    init_logging(verbose);
    match run(&config) {
        Ok(row) => println!("Appended {} to {}", row.join(","), config.output.display()),
        Err(e) => {
            eprintln!("{}", diagnostic_line(&e));
            std::process::exit(1);
        }
    }
}
