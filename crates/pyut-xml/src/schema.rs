//! Element names of the PyUT project file format.

pub const PROJECT: &str = "PyutProject";
pub const DOCUMENT: &str = "PyutDocument";

pub const GRAPHIC_CLASS: &str = "GraphicClass";
pub const GRAPHIC_NOTE: &str = "GraphicNote";
pub const GRAPHIC_ACTOR: &str = "GraphicActor";
pub const GRAPHIC_USE_CASE: &str = "GraphicUseCase";
pub const GRAPHIC_LINK: &str = "GraphicLink";
pub const GRAPHIC_SD_INSTANCE: &str = "GraphicSDInstance";
pub const GRAPHIC_SD_MESSAGE: &str = "GraphicSDMessage";

pub const CLASS: &str = "Class";
pub const METHOD: &str = "Method";
pub const MODIFIER: &str = "Modifier";
pub const RETURN: &str = "Return";
pub const PARAM: &str = "Param";
pub const FIELD: &str = "Field";
pub const NOTE: &str = "Note";
pub const ACTOR: &str = "Actor";
pub const USE_CASE: &str = "UseCase";
pub const LINK: &str = "Link";
pub const SD_INSTANCE: &str = "SDInstance";
pub const SD_MESSAGE: &str = "SDMessage";

pub const CONTROL_POINT: &str = "ControlPoint";
pub const LABEL_CENTER: &str = "LabelCenter";
pub const LABEL_SRC: &str = "LabelSrc";
pub const LABEL_DST: &str = "LabelDst";
