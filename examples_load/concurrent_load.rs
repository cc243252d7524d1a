use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crumb_log::console::SilentConsole;
use crumb_log::{log_error, log_info, log_network, FacadeConfig, LogFacade, NoopReporter};

fn main() {
    let facade = Arc::new(
        LogFacade::new(FacadeConfig::default(), Arc::new(NoopReporter)).with_console(Arc::new(SilentConsole)),
    );

    let threads: u64 = 8;
    let per_thread: u64 = 50_000;
    let start = Instant::now();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let facade = Arc::clone(&facade);
            thread::spawn(move || {
                for i in 0..per_thread {
                    match i % 3 {
                        0 => log_info!(facade, "thread {} iteration {}", t, i),
                        1 => log_network!(facade, i),
                        _ => log_error!(facade, "thread {} failure {}", t, i),
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    let n = threads * per_thread;
    let elapsed = start.elapsed();
    println!("facade: {} calls in {:?} (~{:.0} calls/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
