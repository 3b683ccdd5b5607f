//! Host-side helper: `cargo run` builds the wasm package into
//! `static/pkg` and serves `static/` on a local HTTP port.

#[cfg(not(target_arch = "wasm32"))]
mod dev {
    use std::env;
    use std::process::{Command, ExitStatus};

    use log::{error, info, warn};

    const DEFAULT_PORT: u16 = 8000;

    #[derive(Debug, thiserror::Error)]
    enum DevError {
        #[error("could not launch `{tool}`")]
        Launch {
            tool: &'static str,
            #[source]
            source: std::io::Error,
        },
        #[error("`{tool}` exited with {status}")]
        Failed {
            tool: &'static str,
            status: ExitStatus,
        },
        #[error("SHADER_VIEW_PORT={0:?} is not a port number")]
        Port(String),
    }

    fn run(tool: &'static str, args: &[&str]) -> Result<(), DevError> {
        info!("running {tool} {}", args.join(" "));
        let status = Command::new(tool)
            .args(args)
            .status()
            .map_err(|source| DevError::Launch { tool, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(DevError::Failed { tool, status })
        }
    }

    fn port() -> Result<u16, DevError> {
        match env::var("SHADER_VIEW_PORT") {
            Ok(text) => text.parse().map_err(|_| DevError::Port(text)),
            Err(_) => Ok(DEFAULT_PORT),
        }
    }

    fn serve(port: u16) -> Result<(), DevError> {
        info!("serving static/ at http://127.0.0.1:{port}");
        run(
            "python3",
            &["-m", "http.server", &port.to_string(), "--directory", "static"],
        )
    }

    pub fn main() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let result = port().and_then(|port| {
            match run(
                "wasm-pack",
                &["build", "--release", "--target", "web", "--out-dir", "static/pkg"],
            ) {
                Ok(()) => {}
                Err(err @ DevError::Launch { .. }) => {
                    warn!("{err}; serving whatever is already in static/pkg");
                }
                Err(err) => return Err(err),
            }
            serve(port)
        });

        if let Err(err) = result {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    dev::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
