use std::io::{self, BufRead, Write};

use anyhow::Context;

use shopcart_app::{App, AppConfig, Catalog, Gesture, StoreProvider};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    shopcart_observability::init(config.log_format);

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::embedded()?,
    };
    tracing::info!(
        products = catalog.products().count(),
        currency = %config.currency,
        "catalog loaded"
    );

    let provider = StoreProvider::new(config.currency);
    let mut app = App::new(&provider, catalog);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_lines(&mut out, &app.render())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let gesture = match line.parse::<Gesture>() {
            Ok(gesture) => gesture,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        let reply = app.handle(gesture)?;
        print_lines(&mut out, &reply.lines)?;
        if reply.exit {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
