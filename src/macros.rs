/// Builds an [`Element`](crate::Element) tree from a literal.
///
/// Objects become dicts (keys are property names without the `/`), arrays
/// become lists, and any other expression goes through `Element::from`.
///
/// ```rust
/// use engine_data::{engine_data, Element};
///
/// let style = engine_data!({
///     "Name": "Normal RGB",
///     "FontSize": 12.0,
///     "AutoKerning": true,
///     "Values": [1.0, 0.0, 0.0, 0.0]
/// });
///
/// assert_eq!(style.get("AutoKerning"), Some(&Element::Boolean(true)));
/// ```
#[macro_export]
macro_rules! engine_data {
    (true) => {
        $crate::Element::Boolean(true)
    };

    (false) => {
        $crate::Element::Boolean(false)
    };

    ([]) => {
        $crate::Element::List($crate::List::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut list = $crate::List::new();
        $(
            list.push($crate::engine_data!($elem));
        )*
        $crate::Element::List(list)
    }};

    ({}) => {
        $crate::Element::Dict($crate::Dict::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut dict = $crate::Dict::new();
        $(
            dict.insert($key, $crate::engine_data!($value));
        )*
        $crate::Element::Dict(dict)
    }};

    ($other:expr) => {
        $crate::Element::from($other)
    };
}
