use texmend::{NormalizeResultVerbose, RuleTrace};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &NormalizeResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Normalizing: {}", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    for (idx, rule) in res.details.rules.iter().enumerate() {
        print_rule(idx, rule, &palette);
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    if res.output == res.text {
        println!("  {} {}", palette.bold(&res.output), palette.dim("(unchanged)"));
    } else {
        println!("  {}", palette.bold(palette.paint(&res.output, ansi::GREEN)));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Active rules: {}/{}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(res.details.active_rules.len().to_string(), ansi::CYAN),
        res.details.rules.len(),
    );
    println!();
}

fn print_rule(idx: usize, rule: &RuleTrace, palette: &ansi::Palette) {
    let status = if rule.changed {
        palette.paint("✓ changed", ansi::GREEN)
    } else if rule.active {
        palette.dim("· no match")
    } else {
        palette.dim("✗ skipped")
    };

    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.paint(&rule.rule, ansi::BLUE),
        status,
        palette.dim(format!("{:?}", rule.duration)),
    );
    if let Some(output) = &rule.output {
        println!("      {} {}", palette.dim("→"), palette.paint(output, ansi::YELLOW));
    }
}
