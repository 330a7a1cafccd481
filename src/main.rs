//! Interactive command surface.
//!
//! Prompts for a function, bounds, tolerance and method, runs the
//! detector → tester → integrator pipeline, and prints the result plus the
//! reference oracle's advisory text when `WOLFRAM_APP_ID` is set.

use std::env;
use std::io::{self, Write};
use std::process;

use adaptiq::adaptive::{integrate_adaptive, AdaptiveOptions};
use adaptiq::catalog::{builtin_catalog, FunctionEntry};
use adaptiq::convergence::{test_convergence, ConvergenceOptions, Verdict};
use adaptiq::oracle::OracleClient;
use adaptiq::quadrature::Rule;
use adaptiq::singularity::{find_singularities, DetectorOptions};

fn main() {
    env_logger::init();

    let catalog = builtin_catalog();
    let entry = select_function(&catalog);
    let (a, b) = read_bounds();
    let epsilon = read_tolerance();
    let rule = select_rule();

    let singularities =
        match find_singularities(&entry.f, a, b, &DetectorOptions::default()) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };
    if !singularities.is_empty() {
        println!("Detected singular points: {:?}", singularities);
    }

    let verdict = match test_convergence(
        &entry.f,
        a,
        b,
        &singularities,
        &ConvergenceOptions::default(),
    ) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let (a_adj, b_adj) = match verdict {
        Verdict::Divergent { at } => {
            println!("The integral does not exist (diverges near x = {}).", at);
            return;
        }
        Verdict::Convergent { a, b } => (a, b),
    };
    if !singularities.is_empty() {
        println!("The integral is improper but converges.");
    }

    match integrate_adaptive(&entry.f, a_adj, b_adj, epsilon, rule, &AdaptiveOptions::default()) {
        Ok(q) => {
            println!();
            println!("Integrated over [{}, {}]", a_adj, b_adj);
            println!("Integral ≈ {:.6}", q.value);
            println!("Subdivisions: {}", q.subdivisions);
            println!("Error estimate: {:.2e}", q.error);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    // Advisory cross-check only; failures come back as text.
    if let Ok(app_id) = env::var("WOLFRAM_APP_ID") {
        let client = OracleClient::new(app_id);
        let mut split = entry.known_singularities.clone();
        for &p in &singularities {
            if !split.iter().any(|&k| (k - p).abs() < 1e-6) {
                split.push(p);
            }
        }
        split.sort_by(f64::total_cmp);
        println!(
            "Reference (Wolfram|Alpha): {}",
            client.query(&entry.label, a, b, &split)
        );
    }
}

/// Print a prompt and read one trimmed line; exits cleanly on EOF.
fn prompt(message: &str) -> String {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!();
            process::exit(0);
        }
        Ok(_) => line.trim().to_string(),
    }
}

fn select_function(catalog: &[FunctionEntry]) -> &FunctionEntry {
    println!("Choose a function:");
    for (i, entry) in catalog.iter().enumerate() {
        println!("{}. {}", i + 1, entry.label);
    }
    loop {
        if let Ok(k) = prompt("Function number: ").parse::<usize>() {
            if (1..=catalog.len()).contains(&k) {
                return &catalog[k - 1];
            }
        }
        println!("Invalid selection, try again.");
    }
}

fn read_bounds() -> (f64, f64) {
    loop {
        let a = read_number("Lower bound a: ");
        let b = read_number("Upper bound b: ");
        if a < b {
            return (a, b);
        }
        println!("a must be smaller than b.");
    }
}

fn read_tolerance() -> f64 {
    loop {
        let eps = read_number("Target tolerance ε: ");
        if eps > 0.0 {
            return eps;
        }
        println!("The tolerance must be positive.");
    }
}

fn read_number(message: &str) -> f64 {
    loop {
        if let Ok(x) = prompt(message).parse::<f64>() {
            if x.is_finite() {
                return x;
            }
        }
        println!("Invalid number, try again.");
    }
}

fn select_rule() -> Rule {
    loop {
        match prompt("Method (rectangle, trapezoid, simpson): ").as_str() {
            "rectangle" => loop {
                match prompt("Variant (left, right, mid): ").as_str() {
                    "left" => return Rule::RectangleLeft,
                    "right" => return Rule::RectangleRight,
                    "mid" => return Rule::RectangleMidpoint,
                    _ => println!("Invalid variant, try again."),
                }
            },
            "trapezoid" => return Rule::Trapezoid,
            "simpson" => return Rule::Simpson,
            _ => println!("Invalid method, try again."),
        }
    }
}
