use apst_compare::export::finish;
use apst_compare::init_logging;
use apst_compare::scalar::{parse_cli, run};

fn main() {
    let (config, verbose) = parse_cli();
    init_logging(verbose);
    tracing::info!(
        "read data from {} and plot to {}",
        config.input.display(),
        config.output.display()
    );
    finish(run(&config), config.show);
}
