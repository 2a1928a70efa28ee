use sigscan_core::Language;

fn main() {
    std::process::exit(sigscan_cli::run(Language::JavaScript));
}
