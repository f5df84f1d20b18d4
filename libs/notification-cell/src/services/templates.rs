use chrono::{DateTime, Local, Utc};

use shared_models::appointment::Appointment;

/// Contact address printed in patient-facing mail for change requests.
pub const CONTACT_ADDRESS: &str = "info@legoephysiowellness.com";

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Body of the staff alert. Every submitted field appears verbatim; an
/// absent message renders as empty text.
pub fn staff_notification(appointment: &Appointment) -> String {
    format!(
        "<h2>New Appointment Request</h2>\
         <p><strong>Patient:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Date:</strong> {date}</p>\
         <p><strong>Department:</strong> {department}</p>\
         <p><strong>Requested Therapist:</strong> {therapist}</p>\
         <p><strong>Message:</strong> {message}</p>",
        name = appointment.name,
        email = appointment.email,
        phone = appointment.phone,
        date = format_date(&appointment.date),
        department = appointment.department,
        therapist = appointment.therapist,
        message = appointment.message.as_deref().unwrap_or(""),
    )
}

/// Body of the confirmation sent back to the submitter.
pub fn patient_confirmation(appointment: &Appointment) -> String {
    let date = format_date(&appointment.date);
    format!(
        "<h2>Thank you for your appointment request</h2>\
         <p>Dear {name},</p>\
         <p>We have received your appointment request for {date}.</p>\
         <p>Our team will review your request and contact you shortly to \
         confirm your appointment.</p>\
         <p>Appointment Details:</p>\
         <ul>\
         <li>Department: {department}</li>\
         <li>Requested Therapist: {therapist}</li>\
         <li>Date: {date}</li>\
         </ul>\
         <p>If you need to make any changes, please contact us at \
         {contact}</p>",
        name = appointment.name,
        date = date,
        department = appointment.department,
        therapist = appointment.therapist,
        contact = CONTACT_ADDRESS,
    )
}

/// Body of the daily summary: count line plus one table row per booking.
pub fn daily_digest(appointments: &[Appointment], as_of: DateTime<Local>) -> String {
    let rows: String = appointments
        .iter()
        .map(|appointment| {
            format!(
                "<tr>\
                 <td>{name}</td>\
                 <td>{email}</td>\
                 <td>{phone}</td>\
                 <td>{date}</td>\
                 <td>{department}</td>\
                 <td>{therapist}</td>\
                 </tr>",
                name = appointment.name,
                email = appointment.email,
                phone = appointment.phone,
                date = format_date(&appointment.date),
                department = appointment.department,
                therapist = appointment.therapist,
            )
        })
        .collect();

    format!(
        "<h2>Daily Appointments Summary</h2>\
         <p>Summary for {day}</p>\
         <p>Total appointments today: {count}</p>\
         <table border=\"1\" cellpadding=\"5\" style=\"border-collapse: collapse;\">\
         <tr>\
         <th>Name</th>\
         <th>Email</th>\
         <th>Phone</th>\
         <th>Appointment Date</th>\
         <th>Department</th>\
         <th>Therapist</th>\
         </tr>\
         {rows}\
         </table>",
        day = as_of.format("%Y-%m-%d"),
        count = appointments.len(),
        rows = rows,
    )
}
