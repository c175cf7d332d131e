use gpui::{Pixels, Rgba, px};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::String(string) => {
            let string = match string.strip_suffix("px") {
                Some(string) => string,
                None => return Err(D::Error::custom("expected string to end with 'px'")),
            };

            match string.trim().parse::<f32>() {
                Ok(pixels) => Ok(px(pixels)),
                Err(_) => Err(D::Error::custom("could not convert string into pixels")),
            }
        }

        StringOrFloat::Float(pixels) => Ok(px(pixels)),
    }
}

pub fn de_palette<'de, D>(deserializer: D) -> Result<SmallVec<[Rgba; 6]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SmallVec::<[Rgba; 6]>::deserialize(deserializer)?;

    if value.is_empty() {
        return Err(D::Error::custom("palette needs at least one color."));
    }

    Ok(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}
