use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, TreeError};

use super::member::{Gender, Member};

/// Read a member snapshot from a JSON file (an array of member objects).
///
/// This is the shape a web backend exports: field names as in [`Member`],
/// with optional fields omitted or `null` and gender as a free-form string.
///
/// # Errors
/// Returns an error if the file cannot be opened or the JSON is malformed.
pub fn load_members_json<P: AsRef<Path>>(path: P) -> Result<Vec<Member>> {
    let file = File::open(path.as_ref())?;
    let members: Vec<Member> = serde_json::from_reader(BufReader::new(file))?;
    Ok(members)
}

/// Read a member snapshot from a CSV file.
///
/// The first row is a header; columns are matched by (lowercased) name.
/// Required columns: `unique_id`, `first_name`, `last_name`. All other
/// [`Member`] fields are optional columns; empty fields mean "not recorded".
/// `order_of_birth`, when present and non-empty, must parse as an unsigned
/// integer.
///
/// # Errors
/// Returns an error if the file cannot be read, a required column is
/// missing, or a value fails to parse.
pub fn load_members_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Member>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let required = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TreeError::Data(format!("CSV missing '{}' column", name)))
    };
    let optional = |name: &str| headers.iter().position(|h| h == name);

    let uid_col = required("unique_id")?;
    let first_col = required("first_name")?;
    let last_col = required("last_name")?;
    let gender_col = optional("gender");
    let fathers_uid_col = optional("fathers_uid");
    let mothers_uid_col = optional("mothers_uid");
    let fathers_first_col = optional("fathers_first_name");
    let fathers_last_col = optional("fathers_last_name");
    let spouse_col = optional("spouse_uid");
    let order_col = optional("order_of_birth");
    let picture_col = optional("picture_link");

    let mut members = Vec::new();

    for result in reader.records() {
        let record = result?;

        let field = |col: usize| record.get(col).unwrap_or("").to_string();
        let opt_field = |col: Option<usize>| -> Option<String> {
            col.and_then(|c| record.get(c))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let unique_id = field(uid_col);
        if unique_id.is_empty() {
            return Err(TreeError::Data("Row with empty unique_id".to_string()));
        }

        let order_of_birth = match opt_field(order_col) {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                TreeError::Data(format!(
                    "Invalid order_of_birth '{}' for member '{}'",
                    raw, unique_id
                ))
            })?),
            None => None,
        };

        members.push(Member {
            unique_id,
            first_name: field(first_col),
            last_name: field(last_col),
            gender: opt_field(gender_col)
                .as_deref()
                .map_or(Gender::Unknown, Gender::parse),
            fathers_uid: opt_field(fathers_uid_col),
            mothers_uid: opt_field(mothers_uid_col),
            fathers_first_name: opt_field(fathers_first_col),
            fathers_last_name: opt_field(fathers_last_col),
            spouse_uid: opt_field(spouse_col),
            order_of_birth,
            picture_link: opt_field(picture_col),
        });
    }

    Ok(members)
}
