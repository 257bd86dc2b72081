use syn::{GenericArgument, PathArguments, Type};

pub(crate) fn unwrap_option(ty: &Type) -> Option<&Type> {
    single_generic_argument(ty, "Option")
}

pub(crate) fn unwrap_vec(ty: &Type) -> Option<&Type> {
    single_generic_argument(ty, "Vec")
}

fn single_generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.first().and_then(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        }),
        _ => None,
    }
}

/// `int_property` -> `INT_PROPERTY`, `byteValue` -> `BYTE_VALUE`
pub(crate) fn to_screaming_snake_case(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut result = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() && previous_lower {
            result.push('_');
        }
        previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
        result.extend(ch.to_uppercase());
    }
    result
}
