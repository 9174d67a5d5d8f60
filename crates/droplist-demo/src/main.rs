#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = droplist_demo::run_from_env() {
        tracing::error!(message = "demo.failed", error = %error);
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
