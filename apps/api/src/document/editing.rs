//! In-place edits on a `Resume` by whoever currently owns it.
//!
//! Indices are positions in the current display order. No edit here touches
//! `sort_value`.

use thiserror::Error;

use crate::models::resume::{DataPoint, Resume, Section};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("section {index} out of range (resume has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("data point {index} out of range (section has {len} data points)")]
    DataPointOutOfRange { index: usize, len: usize },

    #[error("bullet point {index} out of range (data point has {len} bullet points)")]
    BulletPointOutOfRange { index: usize, len: usize },

    #[error("extra info {index} out of range (resume has {len} extra infos)")]
    ExtraInfoOutOfRange { index: usize, len: usize },
}

fn check(index: usize, len: usize, err: DocumentError) -> Result<(), DocumentError> {
    if index >= len {
        return Err(err);
    }
    Ok(())
}

impl Resume {
    pub fn section_mut(&mut self, index: usize) -> Result<&mut Section, DocumentError> {
        let len = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or(DocumentError::SectionOutOfRange { index, len })
    }

    pub fn data_point_mut(
        &mut self,
        section: usize,
        index: usize,
    ) -> Result<&mut DataPoint, DocumentError> {
        let section = self.section_mut(section)?;
        let len = section.data_points.len();
        section
            .data_points
            .get_mut(index)
            .ok_or(DocumentError::DataPointOutOfRange { index, len })
    }

    /// Appends an empty section and returns its index.
    pub fn add_section(&mut self, name: impl Into<String>) -> usize {
        self.sections.push(Section {
            name: name.into(),
            ..Default::default()
        });
        self.sections.len() - 1
    }

    pub fn rename_section(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.section_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn remove_section(&mut self, index: usize) -> Result<Section, DocumentError> {
        let len = self.sections.len();
        check(index, len, DocumentError::SectionOutOfRange { index, len })?;
        Ok(self.sections.remove(index))
    }

    /// Appends `data_point` to a section and returns its index there.
    pub fn add_data_point(
        &mut self,
        section: usize,
        data_point: DataPoint,
    ) -> Result<usize, DocumentError> {
        let section = self.section_mut(section)?;
        section.data_points.push(data_point);
        Ok(section.data_points.len() - 1)
    }

    pub fn replace_data_point(
        &mut self,
        section: usize,
        index: usize,
        data_point: DataPoint,
    ) -> Result<DataPoint, DocumentError> {
        let slot = self.data_point_mut(section, index)?;
        Ok(std::mem::replace(slot, data_point))
    }

    pub fn remove_data_point(
        &mut self,
        section: usize,
        index: usize,
    ) -> Result<DataPoint, DocumentError> {
        let section = self.section_mut(section)?;
        let len = section.data_points.len();
        check(index, len, DocumentError::DataPointOutOfRange { index, len })?;
        Ok(section.data_points.remove(index))
    }

    /// Moves a data point to `to_index` in `to_section`, within or across
    /// sections. `to_index` past the end appends, like `splice` in the editor.
    ///
    /// Both sections are checked before anything is removed, so a failed
    /// move leaves the résumé untouched.
    pub fn move_data_point(
        &mut self,
        from_section: usize,
        from_index: usize,
        to_section: usize,
        to_index: usize,
    ) -> Result<(), DocumentError> {
        self.section_mut(to_section)?;
        let moved = self.remove_data_point(from_section, from_index)?;
        let target = &mut self.sections[to_section].data_points;
        let at = to_index.min(target.len());
        target.insert(at, moved);
        Ok(())
    }

    /// Moves a section to `to_index`, clamped to the end like `move_data_point`.
    pub fn move_section(&mut self, from_index: usize, to_index: usize) -> Result<(), DocumentError> {
        let moved = self.remove_section(from_index)?;
        let at = to_index.min(self.sections.len());
        self.sections.insert(at, moved);
        Ok(())
    }

    pub fn add_bullet_point(
        &mut self,
        section: usize,
        data_point: usize,
        text: impl Into<String>,
    ) -> Result<usize, DocumentError> {
        let dp = self.data_point_mut(section, data_point)?;
        dp.bullet_points.push(text.into());
        Ok(dp.bullet_points.len() - 1)
    }

    pub fn edit_bullet_point(
        &mut self,
        section: usize,
        data_point: usize,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let dp = self.data_point_mut(section, data_point)?;
        let len = dp.bullet_points.len();
        let slot = dp
            .bullet_points
            .get_mut(index)
            .ok_or(DocumentError::BulletPointOutOfRange { index, len })?;
        *slot = text.into();
        Ok(())
    }

    pub fn remove_bullet_point(
        &mut self,
        section: usize,
        data_point: usize,
        index: usize,
    ) -> Result<String, DocumentError> {
        let dp = self.data_point_mut(section, data_point)?;
        let len = dp.bullet_points.len();
        check(index, len, DocumentError::BulletPointOutOfRange { index, len })?;
        Ok(dp.bullet_points.remove(index))
    }

    pub fn add_extra_info(&mut self, text: impl Into<String>) -> usize {
        self.extra_infos.push(text.into());
        self.extra_infos.len() - 1
    }

    pub fn remove_extra_info(&mut self, index: usize) -> Result<String, DocumentError> {
        let len = self.extra_infos.len();
        check(index, len, DocumentError::ExtraInfoOutOfRange { index, len })?;
        Ok(self.extra_infos.remove(index))
    }
}
