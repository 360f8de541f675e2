use liturgist_core::context::DATE_KEY;
use liturgist_core::fields::COLUMN_MAPPING;

pub fn run() {
    let width = COLUMN_MAPPING.iter().map(|(column, _)| column.len()).max().unwrap_or(0);

    println!("{:<width$}  {}", "(target date)", DATE_KEY, width = width);
    for (column, variable) in COLUMN_MAPPING {
        println!("{column:<width$}  {variable}");
    }
    println!("-- {} fields --", COLUMN_MAPPING.len() + 1);
}
