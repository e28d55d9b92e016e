// One shared server instance behind all HTTP flow tests. Spawned on its own
// OS thread so it outlives each `#[tokio::test]` runtime.
use std::net::SocketAddr;
use std::sync::{OnceLock, mpsc};
use std::time::Duration;

static BASE_URL: OnceLock<String> = OnceLock::new();

// Boot the server once and return the shared base URL.
pub fn ensure_server() -> &'static str {
    BASE_URL.get_or_init(|| {
        let (tx, rx) = mpsc::channel::<SocketAddr>();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // An ephemeral port avoids collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("local addr");
                tx.send(addr).expect("publish bound addr");
                duel_server::run(listener).await.expect("server failed");
            });
        });

        let addr = rx.recv().expect("server thread died before binding");
        wait_until_accepting(addr);
        format!("http://{addr}")
    })
}

// The listener is bound before the address is published, but retry briefly
// so a slow accept loop cannot race the first request.
fn wait_until_accepting(addr: SocketAddr) {
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("server did not become ready in time");
}
