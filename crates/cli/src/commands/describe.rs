use anyhow::Result;
use clap::Parser;
use power_core::{DescriptionArg, PowerDescription};

use super::ContentArgs;

/// Print every configured power and its description
#[derive(Parser, Debug)]
pub struct Describe {
    #[command(flatten)]
    content: ContentArgs,
}

impl Describe {
    pub fn execute(self) -> Result<()> {
        let loaded = self.content.load()?;

        println!(
            "{} power(s), catalog knows: {}",
            loaded.powers.len(),
            loaded.catalog.names().collect::<Vec<_>>().join(", ")
        );
        for power in &loaded.powers {
            println!(
                "  {:<10} {:<8} cooldown={}t consumption={}  {}",
                power.id().to_string(),
                power.name(),
                power.cooldown_ticks(),
                power.consumption(),
                render(&power.description())
            );
        }
        Ok(())
    }
}

/// Plain rendering of a description for terminals without a localizer.
fn render(description: &PowerDescription) -> String {
    match description {
        PowerDescription::Custom(text) => text.clone(),
        PowerDescription::Localized { key, args } => {
            let args: Vec<String> = args
                .iter()
                .map(|arg| match arg {
                    DescriptionArg::Text(text) => text.clone(),
                    DescriptionArg::Int(value) => value.to_string(),
                    DescriptionArg::Float(value) => format!("{value:.1}"),
                    DescriptionArg::Key(key) => format!("<{key}>"),
                })
                .collect();
            format!("{key}({})", args.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_localized_arguments() {
        let description = PowerDescription::Localized {
            key: "power.rainbow",
            args: vec![DescriptionArg::Int(5), DescriptionArg::Float(1.0)],
        };
        assert_eq!(render(&description), "power.rainbow(5, 1.0)");
        assert_eq!(render(&PowerDescription::Custom("Zap".into())), "Zap");
    }
}
