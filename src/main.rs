fn main() {
    if let Err(err) = dendrogram_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
