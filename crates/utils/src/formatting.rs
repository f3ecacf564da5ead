use std::fmt::Display;

use itertools::Itertools;

pub fn format_array(list: impl IntoIterator<Item = impl Display>) -> String {
    let comma_separated = list.into_iter().join(", ");
    if comma_separated.is_empty() {
        "None".to_owned()
    } else {
        format!("[{comma_separated}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_arrays() {
        assert_eq!(format_array(["main", "savings"]), "[main, savings]");
        assert_eq!(format_array(Vec::<String>::new()), "None");
    }
}
