fn main() -> anyhow::Result<()> {
    scriptorium::cli::run_cli()
}
