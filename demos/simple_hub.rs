//! Broadcast hub walkthrough
//!
//! Run with: cargo run --example simple_hub
//!
//! Registers a handful of channel-backed subscribers, broadcasts events
//! (unconditional and filtered), then tears the hub down. Each subscriber's
//! connection task prints what it receives; a removal listener prints every
//! subscriber the hub drops.

use std::sync::Arc;
use std::time::Duration;

use sse_hub::{Broadcaster, ChannelSink, PushEvent, RemovalListener};

struct PrintRemovals;

impl RemovalListener<ChannelSink<PushEvent>, String> for PrintRemovals {
    fn sink_removed(&self, sink: &ChannelSink<PushEvent>, info: &String) {
        println!("subscriber {} dropped ({})", sink.id(), info);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let hub: Broadcaster<ChannelSink<PushEvent>, String> = Broadcaster::new();
    hub.add_listener(Arc::new(PrintRemovals));

    let mut tasks = Vec::new();
    for topic in ["news", "news", "alerts"] {
        let (sink, mut rx) = ChannelSink::new(16);
        let id = sink.id();
        hub.add(sink, topic.to_string());

        tasks.push(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                println!(
                    "subscriber {} <- {}: {:?}",
                    id,
                    event.name.as_deref().unwrap_or("message"),
                    event.data
                );
            }
        }));
    }

    println!("broadcasting to {} subscribers", hub.len());

    hub.send(PushEvent::named("tick", "hello everyone"));
    hub.send_if(PushEvent::named("breaking", "news subscribers only"), |topic| {
        topic == "news"
    });

    // Let deliveries flush before shutting down.
    tokio::time::sleep(Duration::from_millis(100)).await;

    hub.close();

    for task in tasks {
        let _ = task.await;
    }
}
