#[tokio::main]
async fn main() {
    school_backend::run().await;
}
