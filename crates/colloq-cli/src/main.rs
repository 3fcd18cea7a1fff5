mod cli;

fn main() {
    let Err(e) = cli::run() else {
        return;
    };
    // {:#} prints the whole context chain on one line
    eprintln!("{e:#}");
    std::process::exit(1);
}
