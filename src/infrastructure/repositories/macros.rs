/// Appends `column = ?` to an UPDATE builder when `$value` is `Some`,
/// inserting the comma separator as needed.
macro_rules! push_update_field {
    ($builder:expr, $sep:ident, $column:literal, $value:expr) => {
        if let Some(value) = $value {
            if $sep {
                $builder.push(", ");
            }
            $sep = true;
            $builder.push(concat!($column, " = "));
            $builder.push_bind(value);
        }
    };
}

pub(crate) use push_update_field;
