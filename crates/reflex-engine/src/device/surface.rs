/// Display surface a device context draws into.
///
/// Sizes are in physical pixels.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn set_size(&mut self, width: u32, height: u32);

    /// Makes the surface visible to the user (attach to the document, show
    /// the window).
    fn attach(&mut self);
}
