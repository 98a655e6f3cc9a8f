use rust_xlsxwriter::Workbook;

/// Two-sheet xlsx: "Posts" with its header on the first row, and "Gates"
/// with a blank first row and a title above a header on row 3.
pub fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let posts = workbook.add_worksheet();
    posts.set_name("Posts").unwrap();
    posts.write_string(0, 0, "Description").unwrap();
    posts.write_string(0, 1, "Rate").unwrap();
    posts.write_string(1, 0, "Concrete post 2.4m").unwrap();
    posts.write_number(1, 1, 12.5).unwrap();
    posts.write_string(2, 0, "Timber post").unwrap();
    posts.write_string(2, 1, "£8.00").unwrap();

    let gates = workbook.add_worksheet();
    gates.set_name("Gates").unwrap();
    gates.write_string(1, 0, "Gate schedule 2024").unwrap();
    for (col, label) in ["Ref", "Description", "Unit", "Rate"].into_iter().enumerate() {
        gates.write_string(3, col as u16, label).unwrap();
    }
    gates.write_string(4, 0, "G1").unwrap();
    gates.write_string(4, 1, "Palisade gate 1800mm high").unwrap();
    gates.write_string(4, 2, "NR").unwrap();
    gates.write_number(4, 3, 450.0).unwrap();
    gates.write_string(5, 0, "G2").unwrap();
    gates.write_string(5, 1, "Steel gate").unwrap();
    gates.write_string(5, 3, "POA").unwrap();
    gates.write_string(6, 0, "G3").unwrap();
    gates.write_string(6, 1, "Steel gate 1200mm high").unwrap();
    gates.write_number(6, 3, 310.0).unwrap();

    workbook.save_to_buffer().unwrap()
}
