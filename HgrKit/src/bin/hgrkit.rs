fn main() -> anyhow::Result<()> {
    hgrkit::cli::run_cli()
}
