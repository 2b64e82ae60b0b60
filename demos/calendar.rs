use std::env;

use aspect_calendar::{
    build_calendar, filter_by_selection, month_range, AspectType, CalendarRequest,
};

fn main() {
    env_logger::init();

    let request = match env::args().nth(1) {
        Some(path) => match CalendarRequest::load(&path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => {
            let mut r = CalendarRequest::default();
            if let Ok((start, end)) = month_range(2026, 3) {
                r.start = start;
                r.end = end;
            }
            r
        }
    };
    let selection = request.selection();
    let records = build_calendar(&request);

    println!("=== Aspect Calendar ===");
    println!("Range: {} .. {}", request.start, request.end);
    println!(
        "Bodies: {}",
        request.bodies.iter().map(|b| b.label()).collect::<Vec<_>>().join(", ")
    );
    println!("Natal: {}", request.natal_instant);
    println!();

    for record in &records {
        println!("{}", record.date);
        for pos in &record.positions {
            println!("  {} {:<8} {:>7.2}°", pos.body.style().symbol, pos.body.label(), pos.longitude);
        }
        for a in filter_by_selection(&record.transit_aspects, &selection) {
            let exact = if a.exact { " exact" } else { "" };
            println!(
                "  {} {} {}  orb {:.1}°{}",
                a.body_a.style().symbol,
                a.aspect_type.style().symbol,
                a.body_b.style().symbol,
                a.orb,
                exact
            );
        }
        for a in &record.natal_aspects {
            println!(
                "  natal {} {} transit {}  orb {:.1}°",
                a.body_a.label(),
                a.aspect_type.style().symbol,
                a.body_b.label(),
                a.orb
            );
        }
    }

    println!();
    println!("--- Legend ---");
    for kind in AspectType::PRIORITY {
        let style = kind.style();
        println!(
            "{} {:<12} {:>3}°  {:<6}  {}",
            style.symbol,
            kind.label(),
            kind.angle(),
            style.color,
            kind.description()
        );
    }
}
