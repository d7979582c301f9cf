use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = nestegg::api::run_http_server(port).await {
                log::error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("report") => match nestegg::api::run_report_cli(raw_args.into_iter().skip(1)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: nestegg serve [port] | nestegg report [--help]");
            std::process::exit(1);
        }
    }
}
