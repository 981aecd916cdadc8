/// Drawing surface the session owns for the duration of a round
pub trait RenderSurface {
    /// Wipe everything drawn so far
    fn clear(&mut self);

    /// Draw the gallows the figure hangs from
    fn draw_scaffold(&mut self);

    /// Draw one figure part
    fn draw_part(&mut self, part: FigurePart);
}

/// One incremental piece of the hanged figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigurePart {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// Wrong-guess index -> part revealed by that wrong guess.
pub const FIGURE_PARTS: [FigurePart; 6] = [
    FigurePart::Head,
    FigurePart::Torso,
    FigurePart::LeftArm,
    FigurePart::RightArm,
    FigurePart::LeftLeg,
    FigurePart::RightLeg,
];

impl FigurePart {
    /// Part drawn for the wrong guess at `index` (0-based), if any is left
    pub fn for_wrong_guess(index: usize) -> Option<Self> {
        FIGURE_PARTS.get(index).copied()
    }

    /// Position of this part in the draw order
    pub fn index(self) -> usize {
        match self {
            FigurePart::Head => 0,
            FigurePart::Torso => 1,
            FigurePart::LeftArm => 2,
            FigurePart::RightArm => 3,
            FigurePart::LeftLeg => 4,
            FigurePart::RightLeg => 5,
        }
    }
}
