use knuffel::errors::DecodeError;

/// Default distance between cells and around the table, in logical pixels.
pub const DEFAULT_PIXELS: i32 = 5;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Layout {
    #[knuffel(child, default)]
    pub spacing: SpacingConfig,
    #[knuffel(child, default)]
    pub padding: PaddingConfig,
}

/// Horizontal and vertical gap between adjacent cells.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct SpacingConfig {
    #[knuffel(property, default = Pixels(DEFAULT_PIXELS))]
    pub horizontal: Pixels,
    #[knuffel(property, default = Pixels(DEFAULT_PIXELS))]
    pub vertical: Pixels,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            horizontal: Pixels(DEFAULT_PIXELS),
            vertical: Pixels(DEFAULT_PIXELS),
        }
    }
}

/// Inset around the whole table.
///
/// `padding 5` sets every side; individual properties override single sides, so
/// `padding 5 top=0` is 5 everywhere except the top.
#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct PaddingConfig {
    #[knuffel(argument)]
    pub all: Option<Pixels>,
    #[knuffel(property)]
    pub left: Option<Pixels>,
    #[knuffel(property)]
    pub top: Option<Pixels>,
    #[knuffel(property)]
    pub right: Option<Pixels>,
    #[knuffel(property)]
    pub bottom: Option<Pixels>,
}

impl PaddingConfig {
    /// Resolves to `[left, top, right, bottom]`.
    pub fn resolve(&self) -> [i32; 4] {
        let all = self.all.map_or(DEFAULT_PIXELS, |px| px.0);
        let side = |value: Option<Pixels>| value.map_or(all, |px| px.0);
        [
            side(self.left),
            side(self.top),
            side(self.right),
            side(self.bottom),
        ]
    }
}

/// A non-negative pixel distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixels(pub i32);

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Pixels {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        <i32 as knuffel::DecodeScalar<S>>::type_check(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Pixels, DecodeError<S>> {
        let value = <i32 as knuffel::DecodeScalar<S>>::raw_decode(val, ctx)?;
        if value < 0 {
            ctx.emit_error(DecodeError::conversion(
                val,
                "distance in pixels must not be negative",
            ));
            return Ok(Self(0));
        }

        Ok(Self(value))
    }
}
