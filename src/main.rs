use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utlaan::{
    Book, Borrower, Config, Driver, Fleet, Library, Period, Vehicle, VehicleKind, DATE_FORMAT,
};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: UTLAAN_TODAY (format DD/MM/YYYY, default: current date)");
            std::process::exit(1);
        }
    };

    let today = config.today.format(DATE_FORMAT).to_string();
    let next_week = (config.today + chrono::Days::new(7))
        .format(DATE_FORMAT)
        .to_string();

    tracing::info!("Running utlaan demo, today = {}", today);

    run_library_demo(&today, &next_week);
    run_fleet_demo(&today, &next_week);
}

fn run_library_demo(today: &str, return_date: &str) {
    println!("===== Library =====");
    let mut library = Library::new();

    let books = [
        Book::new("Programming Basics", "J. Dupont", "ISBN123", 3),
        Book::new("Mobile Development", "M. Curie", "ISBN456", 2),
        Book::new("Artificial Intelligence", "A. Turing", "ISBN789", 1),
    ];
    for book in books {
        let label = book.to_string();
        match library.add_item(book) {
            Ok(()) => println!("Added: {}", label),
            Err(e) => println!("Not added: {}", e),
        }
    }

    // Duplicate registration is rejected.
    if let Err(e) = library.add_item(Book::new("Shadow Copy", "Anon", "isbn123", 1)) {
        println!("Rejected: {}", e);
    }

    let ada = Borrower::new(1, "Ada Lovelace", "ada@example.com");
    let grace = Borrower::new(2, "Grace Hopper", "grace@example.com");

    // Happy path: the single-copy book goes out to Ada.
    let loan_id = match library.open_transaction("ISBN789", ada.clone(), Period::starting(today)) {
        Ok(id) => {
            println!("Loan opened for {} on {}", ada, today);
            Some(id)
        }
        Err(e) => {
            println!("Loan failed: {}", e);
            None
        }
    };

    // The same book is now unavailable to Grace.
    if let Err(e) = library.open_transaction("ISBN789", grace.clone(), Period::starting(today)) {
        println!("Loan failed: {}", e);
    }

    // Unknown key.
    if let Err(e) = library.open_transaction("ISBN999", grace, Period::starting(today)) {
        println!("Loan failed: {}", e);
    }

    println!("Available books:");
    for book in library.list_available() {
        println!("  {}", book);
    }

    if let Some(id) = loan_id {
        match library.close_transaction(id, return_date.to_string()) {
            Ok(outcome) => println!("Return on {}: {:?}", return_date, outcome),
            Err(e) => println!("Return failed: {}", e),
        }
        // Closing twice is a no-op.
        match library.close_transaction(id, return_date.to_string()) {
            Ok(outcome) => println!("Second return: {:?}", outcome),
            Err(e) => println!("Return failed: {}", e),
        }
    }

    let snapshot = serde_json::to_string_pretty(library.transactions())
        .expect("loan history serializes");
    println!("Loan history:\n{}", snapshot);
}

fn run_fleet_demo(today: &str, end_date: &str) {
    println!("\n===== Fleet =====");
    let mut fleet = Fleet::new();

    let vehicles = [
        Vehicle::new(
            "AA-123-BB",
            "Renault",
            "Clio",
            VehicleKind::Car {
                doors: 5,
                fuel: "petrol".to_string(),
            },
            45_000,
        ),
        Vehicle::new(
            "CC-456-DD",
            "Tesla",
            "Model 3",
            VehicleKind::Car {
                doors: 4,
                fuel: "electric".to_string(),
            },
            12_000,
        ),
        Vehicle::new(
            "EE-789-FF",
            "Yamaha",
            "MT-07",
            VehicleKind::Motorcycle { displacement_cc: 689 },
            8_000,
        ),
        Vehicle::new(
            "GG-321-HH",
            "Honda",
            "CBR600",
            VehicleKind::Motorcycle { displacement_cc: 600 },
            15_000,
        ),
    ];
    for vehicle in vehicles {
        let label = vehicle.to_string();
        match fleet.add_item(vehicle) {
            Ok(()) => println!("Added: {}", label),
            Err(e) => println!("Not added: {}", e),
        }
    }

    let ali = Driver::new("Ali Ben", "P12345678");
    let sara = Driver::new("Sara Lazaar", "P87654321");

    // Happy path reservation.
    let reservation_id =
        match fleet.open_transaction("AA-123-BB", ali.clone(), Period::between(today, end_date)) {
            Ok(id) => {
                println!("Reservation opened for {} from {} to {}", ali, today, end_date);
                Some(id)
            }
            Err(e) => {
                println!("Reservation failed: {}", e);
                None
            }
        };

    // Double-booking and unknown plate both fail.
    if let Err(e) =
        fleet.open_transaction("AA-123-BB", sara.clone(), Period::between(today, end_date))
    {
        println!("Reservation failed: {}", e);
    }
    if let Err(e) =
        fleet.open_transaction("ZZ-000-ZZ", sara.clone(), Period::between(today, end_date))
    {
        println!("Reservation failed: {}", e);
    }

    println!("Available vehicles:");
    for vehicle in fleet.list_available() {
        println!("  {}", vehicle);
    }

    // Close with 300 km on the clock; the reservation remembers the
    // start mileage and the odometer follows.
    if let Some(id) = reservation_id {
        let start = fleet.transaction(id).and_then(|r| r.opening).unwrap_or(0);
        match fleet.close_transaction(id, start + 300) {
            Ok(outcome) => println!("Reservation closed: {:?}", outcome),
            Err(e) => println!("Close failed: {}", e),
        }
        if let Some(vehicle) = fleet.find_by_key("AA-123-BB") {
            println!("After return: {}", vehicle);
        }
    }

    // A stale end mileage is ignored but the vehicle still comes back.
    if let Ok(id) = fleet.open_transaction("EE-789-FF", sara, Period::between(today, end_date)) {
        match fleet.close_transaction(id, 7_500) {
            Ok(outcome) => println!("Reservation closed: {:?}", outcome),
            Err(e) => println!("Close failed: {}", e),
        }
        if let Some(vehicle) = fleet.find_by_key("EE-789-FF") {
            println!("After return: {}", vehicle);
        }
    }

    // Removal is refused while a reservation is open.
    if let Ok(id) = fleet.open_transaction("GG-321-HH", ali, Period::between(today, end_date)) {
        match fleet.remove_item("GG-321-HH") {
            Ok(v) => println!("Removed: {}", v),
            Err(e) => println!("Removal refused: {}", e),
        }
        fleet
            .close_transaction(id, 15_200)
            .expect("reservation closes");
    }
    match fleet.remove_item("CC-456-DD") {
        Ok(v) => println!("Removed: {}", v),
        Err(e) => println!("Removal refused: {}", e),
    }

    let snapshot = serde_json::to_string_pretty(fleet.items()).expect("fleet serializes");
    println!("Final fleet:\n{}", snapshot);
}
