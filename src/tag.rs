//
// Copyright (c) 2016 KAMADA Ken'ichi.
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
// 1. Redistributions of source code must retain the above copyright
//    notice, this list of conditions and the following disclaimer.
// 2. Redistributions in binary form must reproduce the above copyright
//    notice, this list of conditions and the following disclaimer in the
//    documentation and/or other materials provided with the distribution.
//
// THIS SOFTWARE IS PROVIDED BY THE AUTHOR AND CONTRIBUTORS ``AS IS'' AND
// ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED.  IN NO EVENT SHALL THE AUTHOR OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS
// OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION)
// HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT
// LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
// OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
// SUCH DAMAGE.
//

//! The static tag catalog.
//!
//! Each known tag has a field name, an optional default used when the
//! tag is absent from the file, and a value map that translates raw
//! values into display strings.

use std::borrow::Cow;
use std::fmt;

use crate::value::Value;

/// A tag of an IFD entry.
///
/// Well-known tags are associated constants, usable in patterns:
///
/// ```
/// use vogel::Tag;
/// match Tag(0x11a) {
///     Tag::XResolution => {}
///     _ => unreachable!(),
/// }
/// assert_eq!(Tag(0x1234).name(), "NA-0x1234");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u16);

impl Tag {
    /// A pointer to the Exif IFD.  Never stored as a field.
    #[allow(non_upper_case_globals)]
    pub const ExifIFDPointer: Tag = Tag(0x8769);
    /// A pointer to the GPS IFD.  The GPS IFD is not decoded.
    #[allow(non_upper_case_globals)]
    pub const GPSInfoIFDPointer: Tag = Tag(0x8825);

    /// Returns the numeric value of the tag.
    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Returns the catalog entry, or None for an unknown tag.
    #[inline]
    pub fn descriptor(self) -> Option<&'static TagDescriptor> {
        get_tag_descriptor(self)
    }

    /// Returns the field name.  Unknown tags are named `NA-0x<hex>`.
    pub fn name(self) -> Cow<'static, str> {
        match self.descriptor() {
            Some(d) => Cow::Borrowed(d.name),
            None => Cow::Owned(format!("NA-0x{:x}", self.0)),
        }
    }

    /// Returns true if the tag points to a sub-IFD.
    #[inline]
    pub fn is_ifd_pointer(self) -> bool {
        self == Tag::ExifIFDPointer || self == Tag::GPSInfoIFDPointer
    }

    /// Translates a raw value through the value map of this tag.
    /// Unknown tags pass the value through.
    pub fn translate(self, value: Value) -> Value {
        match self.descriptor() {
            Some(d) => d.translate(value),
            None => value,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.name())
    }
}

/// A key of a value map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Matches a scalar integer.
    UInt(u32),
    /// Matches a 2-element integer tuple or a rational.
    Pair(u32, u32),
    /// Matches UNDEFINED bytes or ASCII text.
    Bytes(&'static [u8]),
    /// Matches anything not matched by another key.
    Other,
}

impl Key {
    pub fn matches(&self, value: &Value) -> bool {
        match (*self, value) {
            (Key::UInt(k), Value::Unsigned(v)) => k == *v,
            (Key::UInt(k), Value::Signed(v)) => i64::from(k) == i64::from(*v),
            (Key::Pair(a, b), Value::Tuple(t)) => {
                matches!(t.as_slice(), [Value::Unsigned(x), Value::Unsigned(y)] if *x == a && *y == b)
            }
            (Key::Pair(a, b), Value::Rational(r)) => r.num == a && r.denom == b,
            (Key::Bytes(k), Value::Undefined(v)) => v.as_slice() == k,
            (Key::Bytes(k), Value::Ascii(s)) => s.as_bytes() == k,
            (Key::Other, _) => true,
            _ => false,
        }
    }
}

/// A catalog default in a form that can live in a static.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    UInt(u32),
    Tuple(&'static [u32]),
    Rational(u32, u32),
    Bytes(&'static [u8]),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::UInt(v) => Value::Unsigned(v),
            DefaultValue::Tuple(v) => Value::Tuple(v.iter().map(|&x| Value::Unsigned(x)).collect()),
            DefaultValue::Rational(n, d) => Value::Rational((n, d).into()),
            DefaultValue::Bytes(b) => Value::Undefined(b.to_vec()),
        }
    }
}

/// A catalog entry.
#[derive(Debug)]
pub struct TagDescriptor {
    pub tag: Tag,
    pub name: &'static str,
    pub default: Option<DefaultValue>,
    pub value_map: &'static [(Key, &'static str)],
}

impl TagDescriptor {
    /// Applies the value map: an exact match first, then the `Other`
    /// entry, else the value unchanged.
    pub fn translate(&self, value: Value) -> Value {
        let hit = self
            .value_map
            .iter()
            .find(|(k, _)| *k != Key::Other && k.matches(&value))
            .or_else(|| self.value_map.iter().find(|(k, _)| *k == Key::Other));
        match hit {
            Some(&(_, s)) => Value::Translated(s),
            None => value,
        }
    }

    /// Returns the default, translated through the value map.
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|d| self.translate(d.to_value()))
    }
}

/// Iterates over the whole catalog.
pub fn all() -> impl Iterator<Item = &'static TagDescriptor> {
    CATALOG.iter().copied()
}

macro_rules! generate_tag_catalog {
    (
        $(
            // Copy the doc attribute to the actual definition.
            $( #[$attr:meta] )*
            ($name:ident, $num:expr, $default:expr, $map:expr)
        ),+ $(,)?
    ) => (
        impl Tag {
            $(
                $( #[$attr] )*
                #[allow(non_upper_case_globals)]
                pub const $name: Tag = Tag($num);
            )+
        }

        // A separate module avoids name conflicts between the constants
        // and the descriptors.
        mod tag_desc {
            use super::*;

            $(
                #[allow(non_upper_case_globals)]
                pub static $name: TagDescriptor = TagDescriptor {
                    tag: Tag::$name,
                    name: stringify!($name),
                    default: $default,
                    value_map: $map,
                };
            )+
        }

        static CATALOG: &[&TagDescriptor] = &[ $( &tag_desc::$name, )+ ];

        fn get_tag_descriptor(tag: Tag) -> Option<&'static TagDescriptor> {
            match tag {
                $( Tag::$name => Some(&tag_desc::$name), )+
                _ => None,
            }
        }
    )
}

const RESERVED: (Key, &str) = (Key::Other, "RESERVED");
const NONE: &[(Key, &str)] = &[];

// Tag names follow the Exif field names, not the Rust conventions.
generate_tag_catalog!(
    // Tags relating to image data structure [EXIF23 4.6.4 Table 4].
    (ImageWidth, 256, None, NONE),
    (ImageLength, 257, None, NONE),
    (BitsPerSample, 258, Some(DefaultValue::Tuple(&[8, 8, 8])), NONE),
    (Compression, 259, None, &[
        (Key::UInt(1), "uncompressed"),
        (Key::UInt(6), "JPEG"),
        RESERVED,
    ]),
    (PhotometricInterpretation, 262, None, &[
        (Key::UInt(2), "RGB"),
        (Key::UInt(6), "YCbCr"),
        RESERVED,
    ]),
    // TODO: translate Orientation into rotate/mirror descriptions.
    (Orientation, 274, Some(DefaultValue::UInt(1)), NONE),
    (SamplesPerPixel, 277, Some(DefaultValue::UInt(3)), NONE),
    (PlanarConfiguration, 284, None, &[
        (Key::UInt(1), "chunky"),
        (Key::UInt(2), "planar"),
        RESERVED,
    ]),
    (YCbCrSubSampling, 530, None, &[
        (Key::Pair(2, 1), "YCbCr4:2:2"),
        (Key::Pair(2, 2), "YCbCr4:2:0"),
        RESERVED,
    ]),
    (YCbCrPositioning, 531, Some(DefaultValue::UInt(1)), &[
        (Key::UInt(1), "centered"),
        (Key::UInt(2), "co-sited"),
        RESERVED,
    ]),
    (XResolution, 282, Some(DefaultValue::Rational(72, 1)), NONE),
    (YResolution, 283, Some(DefaultValue::Rational(72, 1)), NONE),
    (ResolutionUnit, 296, Some(DefaultValue::UInt(2)), &[
        (Key::UInt(2), "inches"),
        (Key::UInt(3), "centimeters"),
        RESERVED,
    ]),

    // Tags relating to recording offset.
    (StripOffsets, 273, None, NONE),
    (RowsPerStrip, 278, None, NONE),
    (StripByteCounts, 279, None, NONE),
    /// Offset to the SOI of the thumbnail.  The thumbnail itself is
    /// not extracted.
    (JPEGInterchangeFormat, 513, None, NONE),
    (JPEGInterchangeFormatLength, 514, None, NONE),

    // Tags relating to image data characteristics.
    (TransferFunction, 301, None, NONE),
    (WhitePoint, 318, None, NONE),
    (PrimaryChromaticities, 319, None, NONE),
    (YCbCrCoefficients, 529, None, NONE),
    (ReferenceBlackWhite, 532, None, NONE),

    // Other TIFF tags.
    (DateTime, 306, None, NONE),
    (ImageDescription, 270, None, NONE),
    (Make, 271, None, NONE),
    (Model, 272, None, NONE),
    (Software, 305, None, NONE),
    (Artist, 315, None, NONE),
    (Copyright, 33432, None, NONE),

    // Exif IFD: version [EXIF23 4.6.5 Table 7].
    (ExifVersion, 36864, Some(DefaultValue::Bytes(b"0230")), NONE),
    (FlashpixVersion, 40960, Some(DefaultValue::Bytes(b"0100")), &[
        (Key::Bytes(b"0100"), "Flashpix Format Version 1.0"),
        RESERVED,
    ]),

    // Image data characteristics.
    (ColorSpace, 40961, None, &[
        (Key::UInt(1), "sRGB"),
        (Key::UInt(0xffff), "Uncalibrated"),
        RESERVED,
    ]),
    (Gamma, 42240, None, NONE),

    // Image configuration.
    (ComponentsConfiguration, 37121, None, NONE),
    (CompressedBitsPerPixel, 37122, None, NONE),
    (PixelXDimension, 40962, None, NONE),
    (PixelYDimension, 40963, None, NONE),

    // User information.
    (MakerNote, 37500, None, NONE),
    (UserComment, 37510, None, NONE),

    // Related file information.
    (RelatedSoundFile, 40964, None, NONE),

    // Date and time.
    (DateTimeOriginal, 36867, None, NONE),
    (DateTimeDigitized, 36868, None, NONE),
    (SubSecTime, 37520, None, NONE),
    (SubSecTimeOriginal, 37521, None, NONE),
    (SubSecTimeDigitized, 37522, None, NONE),

    // Picture-taking conditions.
    (ExposureTime, 33434, None, NONE),
    (FNumber, 33437, None, NONE),
    (ExposureProgram, 34850, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Not defined"),
        (Key::UInt(1), "Manual"),
        (Key::UInt(2), "Normal program"),
        (Key::UInt(3), "Aperture priority"),
        (Key::UInt(4), "Shutter priority"),
        (Key::UInt(5), "Creative program (biased toward depth of field)"),
        (Key::UInt(6), "Action program (biased toward fast shutter speed)"),
        (Key::UInt(7), "Portrait mode (for closeup photos with the background out of focus)"),
        (Key::UInt(8), "Landscape mode (for landscape photos with the background in focus)"),
        RESERVED,
    ]),
    (SpectralSensitivity, 34852, None, NONE),
    (PhotographicSensitivity, 34855, None, NONE),
    /// Opto-Electric Conversion Function.
    (OECF, 34856, None, NONE),
    (SensitivityType, 34864, None, &[
        (Key::UInt(0), "Unknown"),
        (Key::UInt(1), "SOS"),
        (Key::UInt(2), "REI"),
        (Key::UInt(3), "ISO Speed"),
        (Key::UInt(4), "SOS,REI"),
        (Key::UInt(5), "SOS,ISO Speed"),
        (Key::UInt(6), "REI,ISO Speed"),
        (Key::UInt(7), "SOS,REI,ISO Speed"),
        RESERVED,
    ]),
    (StandardOutputSensitivity, 34865, None, NONE),
    (RecommendedExposureIndex, 34866, None, NONE),
    (ISOSpeed, 34867, None, NONE),
    (ISOSpeedLatitudeyyy, 34868, None, NONE),
    (ISOSpeedLatitudezzz, 34869, None, NONE),
    (ShutterSpeedValue, 37377, None, NONE),
    (ApertureValue, 37378, None, NONE),
    (BrightnessValue, 37379, None, NONE),
    (ExposureBiasValue, 37380, None, NONE),
    (MaxApertureValue, 37381, None, NONE),
    (SubjectDistance, 37382, None, NONE),
    (MeteringMode, 37383, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Unknown"),
        (Key::UInt(1), "Average"),
        (Key::UInt(2), "CenterWeightedAverage"),
        (Key::UInt(3), "Spot"),
        (Key::UInt(4), "MultiSpot"),
        (Key::UInt(5), "Pattern"),
        (Key::UInt(6), "Partial"),
        (Key::UInt(255), "Other"),
        RESERVED,
    ]),
    (LightSource, 37384, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Unknown"),
        (Key::UInt(1), "Daylight"),
        (Key::UInt(2), "Fluorescent"),
        (Key::UInt(3), "Tungsten"),
        (Key::UInt(4), "Flash"),
        (Key::UInt(9), "Fine weather"),
        (Key::UInt(10), "Cloudy weather"),
        (Key::UInt(11), "Shade"),
        (Key::UInt(12), "Daylight fluorescent (D 5700 - 7100K)"),
        (Key::UInt(13), "Day white fluorescent (N 4600 - 5500K)"),
        (Key::UInt(14), "Cool white fluorescent (W 3800 - 4500K)"),
        (Key::UInt(15), "White fluorescent (WW 3250 - 3800K)"),
        (Key::UInt(16), "Warm white fluorescent (L 2600 - 3250K)"),
        (Key::UInt(17), "Standard light A"),
        (Key::UInt(18), "Standard light B"),
        (Key::UInt(19), "Standard light C"),
        (Key::UInt(20), "D55"),
        (Key::UInt(21), "D65"),
        (Key::UInt(22), "D75"),
        (Key::UInt(23), "D50"),
        (Key::UInt(24), "ISO studio tungsten"),
        (Key::UInt(255), "Other"),
        RESERVED,
    ]),
    (Flash, 37385, None, NONE),
    (FocalLength, 37386, None, NONE),
    (SubjectArea, 37396, None, NONE),
    (FlashEnergy, 41483, None, NONE),
    (SpatialFrequencyResponse, 41484, None, NONE),
    (FocalPlaneXResolution, 41486, None, NONE),
    (FocalPlaneYResolution, 41487, None, NONE),
    (FocalPlaneResolutionUnit, 41488, Some(DefaultValue::UInt(2)), NONE),
    (SubjectLocation, 41492, None, NONE),
    (ExposureIndex, 41493, None, NONE),
    (SensingMethod, 41495, None, &[
        (Key::UInt(1), "Not defined"),
        (Key::UInt(2), "One-chip color area sensor"),
        (Key::UInt(3), "Two-chip color area sensor"),
        (Key::UInt(4), "Three-chip color area sensor"),
        (Key::UInt(5), "Color sequential area sensor"),
        (Key::UInt(7), "Trilinear sensor"),
        (Key::UInt(8), "Color sequential linear sensor"),
        RESERVED,
    ]),
    (FileSource, 41728, Some(DefaultValue::UInt(3)), &[
        (Key::UInt(0), "Others"),
        (Key::UInt(1), "Scanner of transparent type"),
        (Key::UInt(2), "Scanner of reflex type"),
        (Key::UInt(3), "DSC"),
        RESERVED,
    ]),
    (SceneType, 41729, Some(DefaultValue::UInt(1)), &[
        (Key::UInt(1), "A directly photographed image"),
        RESERVED,
    ]),
    (CFAPattern, 41730, None, NONE),
    (CustomRendered, 41985, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Normal Process"),
        (Key::UInt(1), "Custom Process"),
        RESERVED,
    ]),
    (ExposureMode, 41986, None, &[
        (Key::UInt(0), "Auto"),
        (Key::UInt(1), "Manual"),
        (Key::UInt(2), "Auto bracket"),
        RESERVED,
    ]),
    (WhiteBalance, 41987, None, &[
        (Key::UInt(0), "Auto"),
        (Key::UInt(1), "Manual"),
        RESERVED,
    ]),
    (DigitalZoomRatio, 41988, None, NONE),
    (FocalLengthIn35mmFilm, 41989, None, NONE),
    (SceneCaptureType, 41990, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Standard"),
        (Key::UInt(1), "Landscape"),
        (Key::UInt(2), "Portrait"),
        (Key::UInt(3), "Night scene"),
        RESERVED,
    ]),
    (GainControl, 41991, None, &[
        (Key::UInt(0), "None"),
        (Key::UInt(1), "Low gain up"),
        (Key::UInt(2), "High gain up"),
        (Key::UInt(3), "Low gain down"),
        (Key::UInt(4), "High gain down"),
        RESERVED,
    ]),
    (Contrast, 41992, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Normal"),
        (Key::UInt(1), "Soft"),
        (Key::UInt(2), "Hard"),
        RESERVED,
    ]),
    (Saturation, 41993, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Normal"),
        (Key::UInt(1), "Low saturation"),
        (Key::UInt(2), "High saturation"),
        RESERVED,
    ]),
    (Sharpness, 41994, Some(DefaultValue::UInt(0)), &[
        (Key::UInt(0), "Normal"),
        (Key::UInt(1), "Soft"),
        (Key::UInt(2), "Hard"),
        RESERVED,
    ]),
    (DeviceSettingDescription, 41995, None, NONE),
    (SubjectDistanceRange, 41996, None, &[
        (Key::UInt(0), "Unknown"),
        (Key::UInt(1), "Macro"),
        (Key::UInt(2), "Close view"),
        (Key::UInt(3), "Distant view"),
        RESERVED,
    ]),

    // Other Exif tags.
    (ImageUniqueID, 42016, None, NONE),
    (CameraOwnerName, 42032, None, NONE),
    (BodySerialNumber, 42033, None, NONE),
    (LensSpecification, 42034, None, NONE),
    (LensMake, 42035, None, NONE),
    (LensModel, 42036, None, NONE),
    (LensSerialNumber, 42037, None, NONE),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_constant_in_pattern() {
        match Tag(0x132) {
            Tag(0x132) => {}
            _ => panic!("failed to match Tag"),
        }
        match Tag(0x132) {
            Tag::DateTime => {}
            _ => panic!("failed to match Tag"),
        }
        assert_eq!(Tag::ExifIFDPointer.value(), 34665);
        assert_eq!(Tag::GPSInfoIFDPointer.value(), 34853);
        assert!(Tag::GPSInfoIFDPointer.is_ifd_pointer());
        assert!(!Tag::XResolution.is_ifd_pointer());
    }

    #[test]
    fn names() {
        assert_eq!(Tag::PixelXDimension.name(), "PixelXDimension");
        assert_eq!(Tag(0xa005).name(), "NA-0xa005");
        assert_eq!(Tag::ExifIFDPointer.name(), "NA-0x8769");
        assert_eq!(format!("{:>8}", Tag::Flash), "   Flash");
        assert!(Tag(0xa005).descriptor().is_none());
    }

    #[test]
    fn catalog_is_consistent() {
        let mut tags = all().map(|d| d.tag).collect::<Vec<_>>();
        let n = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), n);
        for d in all() {
            assert_eq!(d.tag.descriptor().map(|x| x.name), Some(d.name));
            assert!(!d.tag.is_ifd_pointer());
        }
    }

    #[test]
    fn translate() {
        assert_eq!(
            Tag::ResolutionUnit.translate(Value::Unsigned(3)),
            Value::Translated("centimeters")
        );
        assert_eq!(
            Tag::ResolutionUnit.translate(Value::Unsigned(9)),
            Value::Translated("RESERVED")
        );
        assert_eq!(
            Tag::ColorSpace.translate(Value::Unsigned(0xffff)),
            Value::Translated("Uncalibrated")
        );
        assert_eq!(
            Tag::YCbCrSubSampling.translate(Value::Tuple(vec![Value::Unsigned(2), Value::Unsigned(2)])),
            Value::Translated("YCbCr4:2:0")
        );
        assert_eq!(
            Tag::FlashpixVersion.translate(Value::Undefined(b"0100".to_vec())),
            Value::Translated("Flashpix Format Version 1.0")
        );
        // No value map.
        assert_eq!(Tag::Make.translate(Value::Ascii("Canon".into())), Value::Ascii("Canon".into()));
        // Unknown tag.
        assert_eq!(Tag(0xffff).translate(Value::Unsigned(1)), Value::Unsigned(1));
    }

    #[test]
    fn defaults() {
        let d = |tag: Tag| tag.descriptor().and_then(|d| d.default_value());
        assert_eq!(d(Tag::XResolution), Some(Value::Rational((72, 1).into())));
        assert_eq!(d(Tag::ResolutionUnit), Some(Value::Translated("inches")));
        assert_eq!(d(Tag::YCbCrPositioning), Some(Value::Translated("centered")));
        assert_eq!(d(Tag::ExifVersion), Some(Value::Undefined(b"0230".to_vec())));
        assert_eq!(
            d(Tag::FlashpixVersion),
            Some(Value::Translated("Flashpix Format Version 1.0"))
        );
        assert_eq!(
            d(Tag::BitsPerSample),
            Some(Value::Tuple(vec![Value::Unsigned(8); 3]))
        );
        assert_eq!(d(Tag::FileSource), Some(Value::Translated("DSC")));
        assert_eq!(d(Tag::ColorSpace), None);
    }
}
