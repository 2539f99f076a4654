use crate::cli::Args;

pub fn run(args: Args, fallback_bind: String) {
    println!("Running health check...");
    let bind = args.check_bind.unwrap_or(fallback_bind);
    let endpoint = format!("http://{bind}/api/healthcheck");
    println!("Health check endpoint: {endpoint}");
    match minreq::get(endpoint).with_timeout(1).send() {
        Ok(resp) => {
            let status_code = resp.status_code;

            if status_code != 200 {
                eprintln!("Health check failed with status: {status_code}");
                std::process::exit(1);
            } else {
                println!("Health check passed");
            }
        }
        Err(e) => {
            eprintln!("Health check failed: {e}");
            std::process::exit(1);
        }
    }
}
