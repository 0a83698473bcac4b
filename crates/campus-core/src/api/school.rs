//! Typed access to every backend endpoint the forms use.

use crate::api::endpoints;
use crate::error::Result;
use crate::models::*;
use crate::validate::{check_email, Validate, ValidationErrors};
use campus_http::{ApiClient, ApiError, ApiRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq)]
pub struct EnrollmentQuery {
    pub year_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub status: String,
}

impl EnrollmentQuery {
    /// Active enrollments of one section.
    pub fn active(year_id: EntityId, class_id: EntityId, section_id: EntityId) -> Self {
        Self {
            year_id,
            class_id,
            section_id,
            status: NewEnrollment::DEFAULT_STATUS.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExamSessionQuery {
    pub year_id: EntityId,
    pub subject_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttendanceSummaryQuery {
    pub year_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub subject_id: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttendanceDetailsQuery {
    pub enrollment_id: EntityId,
    pub year_id: EntityId,
    pub subject_id: EntityId,
}

/// Reference lists go through the public client; everything else through
/// the secure one.
#[derive(Clone)]
pub struct SchoolApi {
    public: ApiClient,
    secure: ApiClient,
}

impl SchoolApi {
    pub fn new(public: ApiClient, secure: ApiClient) -> Self {
        Self { public, secure }
    }

    async fn public_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.public.get::<Vec<T>>(path).await?.into_list()?)
    }

    async fn secure_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        Ok(self.secure.send::<Vec<T>>(request).await?.into_list()?)
    }

    async fn secure_one<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        Ok(self.secure.send::<T>(request).await?.into_data()?)
    }

    /// Validate, send, and hand back the backend's message.
    async fn submit<P>(&self, request: ApiRequest, payload: &P) -> Result<Option<String>>
    where
        P: Serialize + Validate,
    {
        payload.validate()?;
        let request = request.with_json(payload)?;
        Ok(self
            .secure
            .send::<serde_json::Value>(request)
            .await?
            .into_message()?)
    }

    pub async fn years(&self) -> Result<Vec<AcademicYear>> {
        self.public_list(endpoints::YEARS).await
    }

    pub async fn departments(&self) -> Result<Vec<Department>> {
        self.public_list(endpoints::DEPARTMENTS).await
    }

    pub async fn classes(&self) -> Result<Vec<SchoolClass>> {
        self.public_list(endpoints::CLASSES).await
    }

    pub async fn sections(&self) -> Result<Vec<Section>> {
        self.public_list(endpoints::SECTIONS).await
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>> {
        self.public_list(endpoints::SUBJECTS).await
    }

    pub async fn teachers(&self) -> Result<Vec<Teacher>> {
        self.public_list(endpoints::TEACHERS).await
    }

    pub async fn exam_types(&self) -> Result<Vec<ExamType>> {
        self.public_list(endpoints::EXAM_TYPES).await
    }

    pub async fn exam_slots(&self) -> Result<Vec<ExamSlot>> {
        self.public_list(endpoints::EXAM_SLOTS).await
    }

    pub async fn days(&self) -> Result<Vec<WeekDay>> {
        self.public_list(endpoints::DAYS).await
    }

    pub async fn slots(&self) -> Result<Vec<Slot>> {
        self.public_list(endpoints::SLOTS).await
    }

    pub async fn students(&self) -> Result<Vec<Student>> {
        self.secure_list(ApiRequest::get(endpoints::STUDENTS)).await
    }

    /// Account lookup used to prefill admission and teacher forms.
    pub async fn user_by_email(&self, email: &str) -> Result<UserProfile> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", email);
        errors.into_result()?;
        self.secure_one(ApiRequest::get(endpoints::user_by_email(email.trim())))
            .await
    }

    pub async fn teacher_by_user(&self, user_id: &UserId) -> Result<Teacher> {
        self.secure_one(ApiRequest::get(endpoints::teacher_by_user(user_id.as_str())))
            .await
    }

    pub async fn teacher_routine(
        &self,
        teacher_id: EntityId,
        year_id: EntityId,
    ) -> Result<Vec<TeacherRoutine>> {
        self.secure_list(ApiRequest::get(endpoints::teacher_routine(teacher_id, year_id)))
            .await
    }

    pub async fn enrollments(&self, query: &EnrollmentQuery) -> Result<Vec<Enrollment>> {
        let request = ApiRequest::get(endpoints::ENROLLMENTS)
            .with_query("year_id", query.year_id)
            .with_query("class_id", query.class_id)
            .with_query("section_id", query.section_id)
            .with_query("status", &query.status);
        self.secure_list(request).await
    }

    pub async fn exam_sessions(&self, query: &ExamSessionQuery) -> Result<Vec<ExamSession>> {
        let request = ApiRequest::get(endpoints::EXAM_SESSIONS)
            .with_query("year_id", query.year_id)
            .with_query("subject_id", query.subject_id)
            .with_query("class_id", query.class_id)
            .with_query("section_id", query.section_id);
        self.secure_list(request).await
    }

    /// The recorded result, or `None` if marks were not entered yet.
    pub async fn existing_result(
        &self,
        exam_session_id: EntityId,
        enrollment_id: EntityId,
    ) -> Result<Option<ResultRecord>> {
        let request = ApiRequest::get(endpoints::result(exam_session_id, enrollment_id));
        match self.secure.send::<ResultRecord>(request).await {
            Ok(envelope) if envelope.success => Ok(envelope.data),
            Ok(_) => Ok(None),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn attendance_summary(
        &self,
        query: &AttendanceSummaryQuery,
    ) -> Result<Vec<AttendanceSummaryRow>> {
        let request = ApiRequest::get(endpoints::ATTENDANCE_SUMMARY)
            .with_query("year_id", query.year_id)
            .with_query("class_id", query.class_id)
            .with_query("section_id", query.section_id)
            .with_query("subject_id", query.subject_id);
        self.secure_list(request).await
    }

    pub async fn attendance_details(
        &self,
        query: &AttendanceDetailsQuery,
    ) -> Result<AttendanceDetails> {
        let request = ApiRequest::get(endpoints::ATTENDANCE_DETAILS)
            .with_query("enrollment_id", query.enrollment_id)
            .with_query("year_id", query.year_id)
            .with_query("subject_id", query.subject_id);
        self.secure_one(request).await
    }

    pub async fn enroll(&self, form: &NewEnrollment) -> Result<Option<String>> {
        form.validate()?;
        let payload = form.clone().normalized();
        self.submit(ApiRequest::post(endpoints::NEW_ENROLLMENT), &payload)
            .await
    }

    pub async fn add_routine(&self, form: &NewRoutine) -> Result<Option<String>> {
        self.submit(ApiRequest::post(endpoints::ADD_ROUTINE), form)
            .await
    }

    pub async fn take_attendance(&self, sheet: &AttendanceSubmission) -> Result<Option<String>> {
        sheet.validate()?;
        let payload = sheet.clone().normalized();
        self.submit(ApiRequest::post(endpoints::TAKE_ATTENDANCE), &payload)
            .await
    }

    /// Correct one attendance record.
    pub async fn update_attendance(
        &self,
        record_id: EntityId,
        status: AttendanceStatus,
    ) -> Result<Option<String>> {
        let request = ApiRequest::put(endpoints::update_attendance(record_id, &status.to_string()));
        Ok(self
            .secure
            .send::<serde_json::Value>(request)
            .await?
            .into_message()?)
    }

    pub async fn add_result(&self, form: &NewResult) -> Result<Option<String>> {
        self.submit(ApiRequest::post(endpoints::ADD_RESULT), form)
            .await
    }

    pub async fn add_exam_session(&self, form: &NewExamSession) -> Result<Option<String>> {
        form.validate()?;
        let payload = form.clone().normalized();
        self.submit(ApiRequest::post(endpoints::ADD_EXAM), &payload)
            .await
    }

    pub async fn add_department(&self, form: &DepartmentForm) -> Result<Option<String>> {
        self.submit(ApiRequest::post(endpoints::ADD_DEPARTMENT), form)
            .await
    }

    pub async fn update_department(
        &self,
        department_id: EntityId,
        form: &DepartmentForm,
    ) -> Result<Option<String>> {
        self.submit(ApiRequest::put(endpoints::update_department(department_id)), form)
            .await
    }

    pub async fn add_student(&self, form: &NewStudent) -> Result<Option<String>> {
        form.validate()?;
        let payload = form.clone().normalized();
        self.submit(ApiRequest::post(endpoints::ADD_STUDENT), &payload)
            .await
    }

    pub async fn add_teacher(&self, form: &NewTeacher) -> Result<Option<String>> {
        self.submit(ApiRequest::post(endpoints::ADD_TEACHER), form)
            .await
    }
}
