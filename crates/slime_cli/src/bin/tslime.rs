fn main() -> anyhow::Result<()> {
    slime_cli::run(slime_cli::Surface::TSLIME)
}
