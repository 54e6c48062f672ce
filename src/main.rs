use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = rottening::trace::init() {
        eprintln!("{e}");
    }

    let args: Vec<String> = std::env::args().collect();
    let env = |name: &str| std::env::var(name).ok();

    if let Err(e) = rottening::run::run(args, &env, None).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
