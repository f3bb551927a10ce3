use log::{error, info};
use sovran_mapparams::{ParamError, Params};

struct SendReport {
    recipient: String,
    attempt: i64,
    threshold: f64,
    urgent: bool,
}

impl SendReport {
    fn from_params(params: &Params) -> Result<Self, ParamError> {
        let mut args = params.accessor();
        let job = SendReport {
            recipient: args.string("recipient"),
            attempt: args.int64("attempt"),
            threshold: args.float64("threshold"),
            urgent: args.bool("urgent"),
        };
        args.finish()?;
        Ok(job)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let payloads = [
        r#"{"recipient": "ops@example.com", "attempt": 1, "threshold": 5, "urgent": true}"#,
        r#"{"recipient": "ops@example.com", "attempt": 1.5, "threshold": 0.75}"#,
    ];

    for payload in payloads {
        let params = Params::from_json_str(payload)?;
        match SendReport::from_params(&params) {
            Ok(job) => info!(
                "sending report to {} (attempt {}, threshold {}, urgent: {})",
                job.recipient, job.attempt, job.threshold, job.urgent
            ),
            Err(e) => error!("rejecting job: {}", e),
        }
    }

    Ok(())
}
