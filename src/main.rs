use shape_exact::cli;

fn main() -> anyhow::Result<()> {
    cli::CommandLineInterface::load().run()
}
