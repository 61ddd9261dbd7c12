//! The `explain` command: describe a diagnostic kind.

use dcl_diagnostic::DiagnosticKind;

/// Print the documentation for a diagnostic kind name.
pub fn explain_kind(name: &str) {
    let Ok(kind) = name.parse::<DiagnosticKind>() else {
        eprintln!("Unknown diagnostic: {name}");
        eprintln!();
        eprintln!("Known diagnostics:");
        for kind in DiagnosticKind::ALL {
            eprintln!("  {}", kind.as_str());
        }
        std::process::exit(1);
    };

    println!("{} ({})", kind.as_str(), kind.severity());
    println!();
    println!("{}", kind.message());
    println!();
    println!("{}", kind.explanation());
}
